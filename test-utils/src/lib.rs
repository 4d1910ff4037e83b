mod build_bin;
mod mock;
mod background_reader;
mod kill_on_drop;
mod constants;
mod reqwest;
mod ports;
mod process;

pub use build_bin::{build_bin, new_configured_command, BuildBinError, DAEMON_BIN_PATH};
pub use mock::{setup_basic_config, url, MOCK_PEPPER_STR};
pub use background_reader::{BackgroundReader, BackgroundReaderError};
pub use kill_on_drop::{KillOnDropChild, ChildKillOnDropExt};
pub use process::{ChildKillTermExt, FdNonblockExt};
pub use reqwest::*;
pub use ports::LOCAL_PORT;
