mod dispatchable;
mod dispatcher;
mod middleware;
mod reducer;
mod stages;
mod store;
mod subscription;

pub mod features;
pub mod fetch;

pub use dispatchable::{Dispatchable, Dispatched, ThunkJob};
pub use dispatcher::Dispatcher;
pub use middleware::{DispatchFn, Middleware, MiddlewareChain};
pub use reducer::Reducer;
pub use stages::{Guard, Thunks, Trace};
pub use store::{Store, StoreHandle};
pub use subscription::SubscriberId;
