mod app;
mod env;
mod runtime;

pub use app::run;
