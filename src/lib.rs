// AML Web Backend Library
// GitHub contribution analytics and the contact relay behind the AML site

pub mod analytics;
pub mod contact;
pub mod github;
pub mod models;
pub mod server;
