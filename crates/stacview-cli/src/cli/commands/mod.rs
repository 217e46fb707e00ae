mod links;
mod origin;
mod show;

pub use links::run_links;
pub use origin::run_origin;
pub use show::run_show;
