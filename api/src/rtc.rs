//! Decoding battery-backed clock registers.
//!
//! The kernel reads the raw register bytes. This module turns them into a
//! calendar value and formats it for the `date` and `time` commands.

use core::fmt;

/// Convert one packed BCD byte (two decimal digits) to binary: `0x47` is 47.
pub const fn bcd_to_binary(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Set in the hour register for afternoon times when the clock runs in
/// 12-hour mode.
const PM_FLAG: u8 = 0x80;

/// Register bytes exactly as the clock chip returned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockRegisters {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    pub year: u8,
    /// Zero when the chip has no century register.
    pub century: u8,
}

/// How the chip encodes its registers, from its status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFormat {
    pub binary: bool,
    pub hour_24: bool,
}

impl ClockFormat {
    /// The power-on default: BCD digits, 24-hour clock.
    pub const BCD_24H: ClockFormat = ClockFormat { binary: false, hour_24: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockRegisters {
    pub fn decode(self, format: ClockFormat) -> DateTime {
        let digits = |raw: u8| if format.binary { raw } else { bcd_to_binary(raw) };

        let pm = self.hour & PM_FLAG != 0;
        let mut hour = digits(self.hour & !PM_FLAG);
        if !format.hour_24 {
            // 12 AM is midnight, 12 PM is noon.
            hour %= 12;
            if pm {
                hour += 12;
            }
        }

        let century = match digits(self.century) {
            0 => 20,
            c => c,
        };

        DateTime {
            year: u16::from(century) * 100 + u16::from(digits(self.year)),
            month: digits(self.month),
            day: digits(self.day),
            hour,
            minute: digits(self.minute),
            second: digits(self.second),
        }
    }
}

impl DateTime {
    /// Formats as `DD/MM/YYYY`.
    pub fn date(&self) -> impl fmt::Display + '_ {
        DateDisplay(self)
    }

    /// Formats as `HH:MM:SS`.
    pub fn time(&self) -> impl fmt::Display + '_ {
        TimeDisplay(self)
    }
}

struct DateDisplay<'a>(&'a DateTime);

impl fmt::Display for DateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.0.day, self.0.month, self.0.year)
    }
}

struct TimeDisplay<'a>(&'a DateTime);

impl fmt::Display for TimeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.0.hour, self.0.minute, self.0.second)
    }
}
