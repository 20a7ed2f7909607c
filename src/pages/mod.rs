mod dashboard;
mod index;
mod profile;
mod projects;
mod skills;

pub use dashboard::DashboardPage;
pub use index::IndexPage;
