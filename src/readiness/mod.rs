mod poller;

pub use poller::*;
