//! Contact form handling
//!
//! Validation for the public contact form and the mail relay that forwards
//! submissions through the Resend API.

mod form;
mod mailer;

pub use form::{ContactForm, FormError};
pub use mailer::{Mailer, MailerError, ResendMailer, RESEND_ENDPOINT};
