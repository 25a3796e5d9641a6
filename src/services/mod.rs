pub mod hosting;

pub use hosting::PullRequestHost;
