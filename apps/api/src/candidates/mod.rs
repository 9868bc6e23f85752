// Candidate pipeline: mock backend handlers, HR list view, and the application form.

pub mod form;
pub mod handlers;
pub mod view;
