// Assessments: mock backend handlers, builder, preview and answer checks, HR list view.

pub mod builder;
pub mod handlers;
pub mod preview;
pub mod view;
