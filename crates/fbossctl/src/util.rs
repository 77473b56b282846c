use fboss_sdk::ConnectionBuilder;
use futures::stream::BoxStream;

use crate::{error::CtlResult, out::CommandOutput};

/// A command that talks to the agent.
///
/// The command receives the connection settings rather than an open connection, so commands
/// that turn out not to need the agent never connect. A connection opened by the command lives
/// inside the returned stream and is closed when the stream is dropped.
pub trait CommandFamily {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>>;
}

#[macro_export]
macro_rules! boxed_try_stream {
    ($($body:tt)*) => {
        async_stream::try_stream!{ $($body)* }.boxed()
    }
}
