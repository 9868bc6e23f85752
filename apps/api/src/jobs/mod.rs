// Jobs board: mock backend handlers, HR view state, and the optimistic reorder protocol.

pub mod form;
pub mod handlers;
pub mod reorder;
pub mod view;
