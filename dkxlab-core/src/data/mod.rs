//! Market data access: provider trait, Eastmoney implementation, throttling,
//! block resampling.

pub mod eastmoney;
pub mod provider;
pub mod resample;
pub mod throttle;

pub use eastmoney::EastmoneyProvider;
pub use provider::{Adjust, DataError, MarketDataProvider, Period, RawBar};
pub use resample::compress_blocks;
pub use throttle::Throttle;
