//! Sharp LS013B7DH05 memory LCD driver
//!
//! Driver for the 144x168 reflective memory LCD over write-only SPI.
//! The panel keeps its image without refresh, but the common electrode
//! (VCOM) polarity must be inverted about once per second or the liquid
//! crystal takes a DC bias.
//!
//! Chip select is active high, so it is driven manually instead of
//! through an `SpiDevice`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use telewatch_display::{DisplayBackend, DisplayError, HEIGHT, LINE_BYTES};

/// Mode byte flags, sent MSB first
mod cmd {
    pub const WRITE_LINE: u8 = 0x80;
    pub const VCOM: u8 = 0x40;
    pub const CLEAR_ALL: u8 = 0x20;
    pub const TRAILER: u8 = 0x00;
}

/// CS setup and hold times rounded up (datasheet: 6us / 2us)
const CS_SETUP_US: u32 = 6;
const CS_HOLD_US: u32 = 2;

/// LS013B7DH05 driver
pub struct MemoryLcd<SPI, CS, DISP, D> {
    spi: SPI,
    cs: CS,
    disp: DISP,
    delay: D,
    /// Current VCOM polarity bit
    vcom: u8,
}

impl<SPI, CS, DISP, D> MemoryLcd<SPI, CS, DISP, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DISP: OutputPin,
    D: DelayNs,
{
    /// Create a new driver; the panel stays disabled until [`init`](Self::init)
    pub fn new(spi: SPI, cs: CS, disp: DISP, delay: D) -> Self {
        Self {
            spi,
            cs,
            disp,
            delay,
            vcom: 0,
        }
    }

    /// Clear panel memory and enable the output
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        self.clear()?;
        self.set_enabled(true)
    }

    /// Run `f` inside one chip-select window
    fn transaction<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut SPI, u8) -> Result<(), SPI::Error>,
    {
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        self.delay.delay_us(CS_SETUP_US);

        let result = f(&mut self.spi, self.vcom).and_then(|()| self.spi.flush());

        self.delay.delay_us(CS_HOLD_US);
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        result.map_err(|_| DisplayError::Communication)
    }
}

/// Panel line address for a 0-based row
///
/// Lines are numbered from 1 and the address goes out LSB first.
fn line_address(row: u8) -> u8 {
    (row + 1).reverse_bits()
}

impl<SPI, CS, DISP, D> DisplayBackend for MemoryLcd<SPI, CS, DISP, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DISP: OutputPin,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.transaction(|spi, vcom| spi.write(&[cmd::CLEAR_ALL | vcom, cmd::TRAILER]))
    }

    fn write_lines<'a, I>(&mut self, lines: I) -> Result<usize, DisplayError>
    where
        I: IntoIterator<Item = (u8, &'a [u8; LINE_BYTES])>,
    {
        let mut lines = lines.into_iter().peekable();
        if lines.peek().is_none() {
            return Ok(0);
        }

        let mut written = 0;
        let mut out_of_range = false;
        self.transaction(|spi, vcom| {
            spi.write(&[cmd::WRITE_LINE | vcom])?;
            for (row, pixels) in lines {
                if row as usize >= HEIGHT {
                    out_of_range = true;
                    break;
                }
                spi.write(&[line_address(row)])?;
                spi.write(pixels)?;
                spi.write(&[cmd::TRAILER])?;
                written += 1;
            }
            spi.write(&[cmd::TRAILER])
        })?;

        if out_of_range {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(written)
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        self.vcom ^= cmd::VCOM;
        self.transaction(|spi, vcom| spi.write(&[vcom, cmd::TRAILER]))
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        let result = if enabled {
            self.disp.set_high()
        } else {
            self.disp.set_low()
        };
        result.map_err(|_| DisplayError::Communication)
    }
}
