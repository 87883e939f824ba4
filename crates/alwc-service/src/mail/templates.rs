//! Message bodies for every email the site sends.
//!
//! Anything a user typed is HTML-escaped before it lands in a body.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use alwc_core::config::email::EmailConfig;
use alwc_core::traits::OutgoingEmail;
use alwc_entity::user::UserRole;

const SITE_NAME: &str = "A Life Worth Celebrating";

/// Renders outgoing messages. Holds the frontend origin used in links.
#[derive(Debug, Clone)]
pub struct MailTemplates {
    frontend_url: String,
}

impl MailTemplates {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &EmailConfig) -> Self {
        Self::new(config.frontend_url.clone())
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// Link a raw reset token is redeemed through.
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={token}", self.frontend_url)
    }

    fn wrap(&self, heading: &str, inner: &str) -> String {
        format!(
            "<!DOCTYPE html><html><body style=\"font-family: Arial, sans-serif; \
             line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;\">\
             <h2 style=\"color: #7B2D8E;\">{heading}</h2>{inner}\
             <hr style=\"margin: 2rem 0; border: none; border-top: 1px solid #e5e7eb;\" />\
             <p style=\"font-size: 0.875rem; color: #6b7280;\">{SITE_NAME}<br />\
             <a href=\"{url}\" style=\"color: #7B2D8E;\">{url_text}</a></p></body></html>",
            url = attr(&self.frontend_url),
            url_text = text(&self.frontend_url),
        )
    }

    fn button(link: &str, label: &str) -> String {
        format!(
            "<p><a href=\"{}\" style=\"display: inline-block; padding: 12px 24px; \
             background: #7B2D8E; color: #fff; text-decoration: none; border-radius: 6px;\">{label}</a></p>\
             <p style=\"font-size: 0.875rem;\">Or copy this link: {}</p>",
            attr(link),
            text(link),
        )
    }

    pub fn welcome(&self, to: &str, name: &str, token: &str) -> OutgoingEmail {
        let link = self.reset_link(token);
        let html = self.wrap(
            &format!("Welcome to {SITE_NAME}, {}!", text(name)),
            &format!(
                "<p>An administrator has created an account for you to help manage our website.</p>\
                 <p>Set your password to get started:</p>{}\
                 <p>This link expires in 1 hour.</p>",
                Self::button(&link, "Set your password")
            ),
        );
        OutgoingEmail {
            to: to.to_string(),
            subject: format!("Welcome to {SITE_NAME}!"),
            html,
            text: format!(
                "Welcome to {SITE_NAME}, {name}!\n\n\
                 An administrator has created an account for you to help manage our website.\n\n\
                 Set your password here:\n{link}\n\n\
                 This link expires in 1 hour.\n"
            ),
            reply_to: None,
        }
    }

    pub fn password_reset(&self, to: &str, name: &str, token: &str) -> OutgoingEmail {
        let link = self.reset_link(token);
        let html = self.wrap(
            "Reset your password",
            &format!(
                "<p>Hi {},</p><p>We received a request to reset your password.</p>{}\
                 <p>This link expires in 1 hour. If you did not ask for this, ignore this email.</p>",
                text(name),
                Self::button(&link, "Reset password")
            ),
        );
        OutgoingEmail {
            to: to.to_string(),
            subject: format!("Reset your {SITE_NAME} password"),
            html,
            text: format!(
                "Hi {name},\n\nWe received a request to reset your password.\n\n\
                 Reset it here:\n{link}\n\n\
                 This link expires in 1 hour. If you did not ask for this, ignore this email.\n"
            ),
            reply_to: None,
        }
    }

    /// Contact form message; replies go straight to the sender.
    pub fn contact_forward(
        &self,
        to: &str,
        sender_name: &str,
        sender_email: &str,
        message: &str,
    ) -> OutgoingEmail {
        let html = self.wrap(
            "New contact form message",
            &format!(
                "<p><strong>From:</strong> {} &lt;{}&gt;</p>\
                 <div style=\"white-space: pre-wrap; background: #f9fafb; padding: 16px;\">{}</div>",
                text(sender_name),
                text(sender_email),
                text(message)
            ),
        );
        OutgoingEmail {
            to: to.to_string(),
            subject: format!("Contact form: message from {sender_name}"),
            html,
            text: format!("From: {sender_name} <{sender_email}>\n\n{message}\n"),
            reply_to: Some(sender_email.to_string()),
        }
    }

    pub fn superuser_request(
        &self,
        to: &str,
        requester_name: &str,
        requester_email: &str,
        current_role: UserRole,
    ) -> OutgoingEmail {
        let html = self.wrap(
            "Superuser access request",
            &format!(
                "<p><strong>{}</strong> ({}) is asking for elevated access.</p>\
                 <p>Current role: <strong>{}</strong></p>\
                 <p>Review the request in the admin panel.</p>",
                text(requester_name),
                text(requester_email),
                current_role
            ),
        );
        OutgoingEmail {
            to: to.to_string(),
            subject: format!("Superuser access request from {requester_name}"),
            html,
            text: format!(
                "{requester_name} ({requester_email}) is asking for elevated access.\n\
                 Current role: {current_role}\n\nReview the request in the admin panel.\n"
            ),
            reply_to: Some(requester_email.to_string()),
        }
    }

    pub fn newsletter(&self, to: &str, subject: &str, message: &str) -> OutgoingEmail {
        let html = self.wrap(
            &text(subject),
            &format!(
                "<div style=\"white-space: pre-wrap;\">{}</div>\
                 <p style=\"font-size: 0.875rem; color: #6b7280;\">You're receiving this email \
                 because you're subscribed to the {SITE_NAME} newsletter.</p>",
                text(message)
            ),
        );
        OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html,
            text: message.to_string(),
            reply_to: None,
        }
    }
}
