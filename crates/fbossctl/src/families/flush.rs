use fboss_sdk::ConnectionBuilder;
use fbossctl_commands::families::flush::Flush;
use futures::{stream::BoxStream, StreamExt as _};

use crate::{boxed_try_stream, error::CtlResult, out::CommandOutput, util::CommandFamily};

impl CommandFamily for Flush {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>> {
        let filter = self.filter();

        boxed_try_stream! {
            let connection = agent.connect().await?;
            let flushed = connection
                .neighbors()
                .flush_subnet(self.flush_type, &filter)
                .await?;

            yield CommandOutput::result()
                .with_field("flushed", flushed.to_string())
                .with_tty_template("🧹 Flushed {flushed} entries")
                .with_non_tty_template("Flushed {flushed} entries")
        }
    }
}
