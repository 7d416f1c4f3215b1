pub mod rbi_feed;
pub mod rss_feed;

pub use rbi_feed::RbiFeedSource;
pub use rss_feed::RssFeedSource;
