//! GPIO pin assignments — single source of truth for the board wiring.
//!
//! Rev-A carrier board, ESP32-S3.  The TFT pins are owned by the
//! display adapter; the buttons are sampled through [`LevelSource`]
//! (active-low with external pull-ups).
//!
//! [`LevelSource`]: crate::app::ports::LevelSource

/// Feed button.
pub const FEED_BUTTON_GPIO: i32 = 16;

/// Scoop / care button.
pub const CARE_BUTTON_GPIO: i32 = 17;

/// TFT SPI chip select.
pub const TFT_CS_GPIO: i32 = 10;

/// TFT data/command select.
pub const TFT_DC_GPIO: i32 = 9;

/// TFT reset line.
pub const TFT_RST_GPIO: i32 = 8;
