use fboss_sdk::ConnectionBuilder;
use fbossctl_commands::families::verbosity::Verbosity;
use futures::{stream::BoxStream, StreamExt as _};

use crate::{boxed_try_stream, error::CtlResult, out::CommandOutput, util::CommandFamily};

impl CommandFamily for Verbosity {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>> {
        boxed_try_stream! {
            let connection = agent.connect().await?;
            connection.options().set_verbosity(&self.level).await?;

            tracing::info!(level = %self.level, "Set agent verbosity");

            // Type hint only: `try_stream!` infers a `()` item type when the body never yields.
            #[allow(unreachable_code)]
            if false {
                yield unreachable!();
            }
        }
    }
}
