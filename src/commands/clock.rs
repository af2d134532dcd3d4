//! Clock-mode and time-set control commands.
//!
//! Both are tiny fixed-layout commands with no CRC or chunking; they go
//! out as a single acknowledged window. The session layer owns wall-clock
//! lookups, so dates and times arrive here already resolved.

use crate::commands::EncodeEnv;
use crate::error::{PixelError, Result};
use crate::protocol::{single_window, SendPlan};

/// A calendar date as the firmware stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDate {
    /// Day of month (1-31).
    pub day: u8,
    /// Month (1-12).
    pub month: u8,
    /// Two-digit year (0-99).
    pub year: u8,
    /// Day of week, Monday = 1 (1-7).
    pub weekday: u8,
}

impl ClockDate {
    /// Create a validated date.
    pub fn new(day: u8, month: u8, year: u8, weekday: u8) -> Result<Self> {
        range_check("day", day, 1, 31)?;
        range_check("month", month, 1, 12)?;
        range_check("year", year, 0, 99)?;
        range_check("day of week", weekday, 1, 7)?;
        Ok(Self {
            day,
            month,
            year,
            weekday,
        })
    }
}

/// Switch the device to clock mode.
#[derive(Debug, Clone, Copy)]
pub struct ClockModeCommand {
    /// Clock face style (0-8).
    pub style: u8,
    /// 24-hour format.
    pub format_24: bool,
    /// Show the date line.
    pub show_date: bool,
    /// Date to display.
    pub date: ClockDate,
}

impl ClockModeCommand {
    /// Create a clock-mode command.
    pub fn new(style: u8, date: ClockDate) -> Self {
        Self {
            style,
            format_24: true,
            show_date: true,
            date,
        }
    }

    /// Select 12/24-hour format.
    pub fn format_24(mut self, enabled: bool) -> Self {
        self.format_24 = enabled;
        self
    }

    /// Toggle the date line.
    pub fn show_date(mut self, enabled: bool) -> Self {
        self.show_date = enabled;
        self
    }

    /// Validate and frame the command.
    pub fn encode(&self, _env: &EncodeEnv) -> Result<SendPlan> {
        range_check("clock style", self.style, 0, 8)?;

        let command = [
            11, // command length
            0,
            6, // command id
            1, // command type id
            self.style,
            self.format_24 as u8,
            self.show_date as u8,
            self.date.year,
            self.date.month,
            self.date.day,
            self.date.weekday,
        ];
        Ok(single_window("set_clock_mode", &command))
    }
}

/// Set the device wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SetTimeCommand {
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
}

impl SetTimeCommand {
    /// Create a set-time command.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Validate and frame the command.
    pub fn encode(&self, _env: &EncodeEnv) -> Result<SendPlan> {
        range_check("hour", self.hour, 0, 23)?;
        range_check("minute", self.minute, 0, 59)?;
        range_check("second", self.second, 0, 59)?;

        let command = [
            8, // command length
            0,
            1,    // command id
            0x80, // command type id
            self.hour,
            self.minute,
            self.second,
            0,
        ];
        Ok(single_window("set_time", &command))
    }
}

fn range_check(name: &'static str, value: u8, min: u8, max: u8) -> Result<()> {
    if value < min || value > max {
        return Err(PixelError::OutOfRange {
            name,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextRasterizer;
    use crate::device::DeviceInfo;

    struct NoFont;
    impl TextRasterizer for NoFont {
        fn rasterize(
            &self,
            _text: &str,
            _height: u32,
            _render_size: u32,
            _offset: (i32, i32),
        ) -> Result<image::GrayImage> {
            Err(PixelError::Rasterize("unused".into()))
        }
    }

    fn env_fixture() -> (DeviceInfo, NoFont) {
        (DeviceInfo::default(), NoFont)
    }

    #[test]
    fn test_clock_date_validation() {
        assert!(ClockDate::new(31, 12, 99, 7).is_ok());
        assert!(ClockDate::new(0, 1, 0, 1).is_err());
        assert!(ClockDate::new(1, 13, 0, 1).is_err());
        assert!(ClockDate::new(1, 1, 100, 1).is_err());
        assert!(ClockDate::new(1, 1, 0, 0).is_err());
    }

    #[test]
    fn test_clock_mode_wire_bytes() {
        let (device, font) = env_fixture();
        let env = EncodeEnv::new(device, &font);

        let date = ClockDate::new(15, 6, 26, 1).unwrap();
        let plan = ClockModeCommand::new(2, date)
            .format_24(false)
            .encode(&env)
            .unwrap();

        assert_eq!(plan.len(), 1);
        let bytes = plan.windows()[0].as_bytes();
        // Outer prefix, then the fixed 11-byte command.
        assert_eq!(&bytes[..2], &13u16.to_le_bytes());
        assert_eq!(&bytes[2..], &[11, 0, 6, 1, 2, 0, 1, 26, 6, 15, 1]);
    }

    #[test]
    fn test_clock_mode_rejects_style() {
        let (device, font) = env_fixture();
        let env = EncodeEnv::new(device, &font);
        let date = ClockDate::new(1, 1, 0, 1).unwrap();
        assert!(ClockModeCommand::new(9, date).encode(&env).is_err());
    }

    #[test]
    fn test_set_time_wire_bytes() {
        let (device, font) = env_fixture();
        let env = EncodeEnv::new(device, &font);

        let plan = SetTimeCommand::new(23, 59, 1).encode(&env).unwrap();
        let bytes = plan.windows()[0].as_bytes();
        assert_eq!(&bytes[2..], &[8, 0, 1, 0x80, 23, 59, 1, 0]);
    }

    #[test]
    fn test_set_time_rejects_out_of_range() {
        let (device, font) = env_fixture();
        let env = EncodeEnv::new(device, &font);
        assert!(SetTimeCommand::new(24, 0, 0).encode(&env).is_err());
        assert!(SetTimeCommand::new(0, 60, 0).encode(&env).is_err());
        assert!(SetTimeCommand::new(0, 0, 60).encode(&env).is_err());
    }
}
