// Business report pipeline: submission validation, analysis prompt,
// document composition, PDF rendering and staged delivery.

pub mod classify;
pub mod composer;
pub mod document;
pub mod handlers;
pub mod prompts;
pub mod render;
pub mod staging;
pub mod styles;
pub mod submission;
pub mod validation;
