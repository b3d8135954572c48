//! # GISource Channels
//! Production collaborator implementations: Google Sheets, Google Docs, and
//! the SMTP notification channel.

pub mod docs;
pub mod email;
pub mod sheets;

pub use docs::DocsClient;
pub use email::SmtpMailer;
pub use sheets::SheetsClient;
