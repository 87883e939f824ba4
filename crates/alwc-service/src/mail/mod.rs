//! Transactional email: delivery backends and message templates.

pub mod factory;
pub mod log;
pub mod sendgrid;
pub mod templates;

pub use factory::build_mailer;
pub use log::LogMailer;
pub use sendgrid::SendGridMailer;
pub use templates::MailTemplates;
