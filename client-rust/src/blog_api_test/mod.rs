mod mock;

pub use mock::{MockBlogApi, MockCall, MockResponder, MockResult};
