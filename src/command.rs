//! The command set for the SSD1306.
//!
//! Note: the display RAM is arranged in pages, horizontal strips of 8 pixel rows,
//! where each byte drives the 8 vertically-adjacent pixels of one column within the
//! page. "Page" addresses below always refer to these strips, so a 128x32 panel has
//! pages 0 through 3.
//!
//! Command opcodes and their operand bytes all travel as command writes; only RAM
//! contents travel as data writes.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Geometry of the 128x32 panel. A differently-sized module needs only these
    //! constants changed; all addressing math in the crate is derived from them.

    pub const NUM_PIXEL_COLS: u16 = 128;
    pub const NUM_PIXEL_ROWS: u16 = 32;
    pub const NUM_PAGES: u16 = NUM_PIXEL_ROWS / 8;
    pub const PIXEL_COL_MAX: u8 = (NUM_PIXEL_COLS - 1) as u8;
    pub const PIXEL_ROW_MAX: u8 = (NUM_PIXEL_ROWS - 1) as u8;
    pub const PAGE_MAX: u8 = (NUM_PAGES - 1) as u8;
    /// Highest COM line the chip itself can drive, independent of panel height.
    pub const COM_LINE_MAX: u8 = 63;
    pub const FRAME_BUF_LEN: usize = (NUM_PIXEL_COLS * NUM_PIXEL_ROWS / 8) as usize;
    /// The usual 7-bit bus address of SSD1306 modules.
    pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;
}

use self::consts::*;

/// The address increment behavior when writing image data into the display RAM.
#[derive(Clone, Copy)]
pub enum MemoryMode {
    /// The column address increments first, wrapping to the next page at the end of
    /// the column range. Streaming a full page-major framebuffer in this mode paints
    /// the whole panel in one pass.
    Horizontal,
    /// The page address increments first, wrapping to the next column at the end of
    /// the page range.
    Vertical,
    /// Only the column address increments; the page must be selected explicitly.
    Page,
}

/// Mapping of segment driver lines to display columns. Changing this setting flips
/// the image horizontally.
#[derive(Clone, Copy)]
pub enum SegmentRemap {
    /// Column address 0 drives SEG0.
    Forward,
    /// Column address 127 drives SEG0.
    Reverse,
}

/// Setting of the COM line scanning of rows. Changing this setting flips the image
/// vertically.
#[derive(Clone, Copy)]
pub enum ComScanDirection {
    /// COM lines scan top to bottom, so row address 0 is the first display row.
    RowZeroFirst,
    /// COM lines scan bottom to top, so row address 0 is the last display row.
    RowZeroLast,
}

/// Wiring of the COM lines to the display rows. This is dictated by how the module
/// wires the OLED matrix to the driver chip; the wrong value interleaves or halves
/// the image. 128x32 modules use `Sequential`, 128x64 modules use `Alternative`.
#[derive(Clone, Copy)]
pub enum ComPinConfig {
    Sequential,
    Alternative,
}

/// Direction of a continuous horizontal scroll.
#[derive(Clone, Copy)]
pub enum ScrollDirection {
    Right,
    Left,
}

#[derive(Clone, Copy)]
pub enum Command {
    /// Turn the panel drive on or off. RAM contents are preserved while off.
    SetDisplayOn(bool),
    /// Set the display clock: divide ratio in the low nibble, oscillator frequency
    /// in the high nibble.
    SetDisplayClockDivide(u8),
    /// Set the MUX ratio, the number of active COM lines. Range 16-64.
    SetMultiplexRatio(u8),
    /// Set the vertical shift applied after the COM scan. Range 0-63.
    SetDisplayOffset(u8),
    /// Set which display RAM row maps to the first COM line. Range 0-63.
    SetStartLine(u8),
    /// Enable or disable the internal charge pump. Modules powered from an external
    /// VCC rail run with it disabled.
    SetChargePump(bool),
    /// Set the RAM address increment behavior. See `MemoryMode`.
    SetMemoryMode(MemoryMode),
    /// Set the segment-to-column mapping. See `SegmentRemap`.
    SetSegmentRemap(SegmentRemap),
    /// Set the COM scan direction. See `ComScanDirection`.
    SetComScanDirection(ComScanDirection),
    /// Set the COM pin hardware wiring. See `ComPinConfig`.
    SetComPinConfig(ComPinConfig),
    /// Set the contrast current. Range 0-255.
    SetContrast(u8),
    /// Set the precharge phase lengths in DCLKs, phase 1 then phase 2. Each ranges
    /// 1-15.
    SetPrechargePeriod(u8, u8),
    /// Set the VCOMH deselect level register. The operand byte is written verbatim.
    SetVcomhDeselectLevel(u8),
    /// Light every pixel regardless of RAM contents (`true`), or resume displaying
    /// the RAM contents (`false`).
    SetEntireDisplayOn(bool),
    /// Display the RAM contents with inverted (`true`) or normal (`false`) polarity.
    SetInversion(bool),
    /// Set the column start and end address of the RAM addressing window. The column
    /// pointer resets to the start address. Range 0-127.
    SetColumnAddress(u8, u8),
    /// Set the page start and end address of the RAM addressing window. The page
    /// pointer resets to the start address. Range 0-3.
    SetPageAddress(u8, u8),
    /// Configure a continuous horizontal scroll over an inclusive page range. The
    /// scroll does not move until activated with `SetScrollActive(true)`.
    SetupHorizontalScroll(ScrollDirection, u8, u8),
    /// Start (`true`) or stop (`false`) the configured scroll. Stopping a scroll
    /// leaves the RAM contents undefined, so the next frame push repaints them.
    SetScrollActive(bool),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        Ok(($cmd, &$buf[..0]))
    };
    ($buf:ident, $cmd:expr,[$arg0:expr]) => {{
        $buf[0] = $arg0;
        Ok(($cmd, &$buf[..1]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        Ok(($cmd, &$buf[..2]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr, $arg2:expr, $arg3:expr, $arg4:expr, $arg5:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        $buf[2] = $arg2;
        $buf[3] = $arg3;
        $buf[4] = $arg4;
        $buf[5] = $arg5;
        Ok(($cmd, &$buf[..6]))
    }};
}

impl Command {
    /// Transmit the command to the display at `iface`, returning `Error::OutOfRange`
    /// without touching the bus if an argument does not fit its register.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 6];
        let (cmd, data) = match self {
            Command::SetDisplayOn(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0xAF,
                    false => 0xAE,
                },
                []
            ),
            Command::SetDisplayClockDivide(setting) => ok_command!(arg_buf, 0xD5, [setting]),
            Command::SetMultiplexRatio(ratio) => match ratio {
                16..=64 => ok_command!(arg_buf, 0xA8, [ratio - 1]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetDisplayOffset(line) => match line {
                0..=COM_LINE_MAX => ok_command!(arg_buf, 0xD3, [line]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetStartLine(line) => match line {
                0..=COM_LINE_MAX => ok_command!(arg_buf, 0x40 | line, []),
                _ => Err(Error::OutOfRange),
            },
            Command::SetChargePump(ena) => ok_command!(
                arg_buf,
                0x8D,
                [match ena {
                    true => 0x14,
                    false => 0x10,
                }]
            ),
            Command::SetMemoryMode(mode) => ok_command!(
                arg_buf,
                0x20,
                [match mode {
                    MemoryMode::Horizontal => 0x00,
                    MemoryMode::Vertical => 0x01,
                    MemoryMode::Page => 0x02,
                }]
            ),
            Command::SetSegmentRemap(remap) => ok_command!(
                arg_buf,
                match remap {
                    SegmentRemap::Forward => 0xA0,
                    SegmentRemap::Reverse => 0xA1,
                },
                []
            ),
            Command::SetComScanDirection(direction) => ok_command!(
                arg_buf,
                match direction {
                    ComScanDirection::RowZeroFirst => 0xC0,
                    ComScanDirection::RowZeroLast => 0xC8,
                },
                []
            ),
            Command::SetComPinConfig(config) => ok_command!(
                arg_buf,
                0xDA,
                [match config {
                    ComPinConfig::Sequential => 0x02,
                    ComPinConfig::Alternative => 0x12,
                }]
            ),
            Command::SetContrast(contrast) => ok_command!(arg_buf, 0x81, [contrast]),
            Command::SetPrechargePeriod(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(arg_buf, 0xD9, [phase_2 << 4 | phase_1]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetVcomhDeselectLevel(level) => ok_command!(arg_buf, 0xDB, [level]),
            Command::SetEntireDisplayOn(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0xA5,
                    false => 0xA4,
                },
                []
            ),
            Command::SetInversion(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0xA7,
                    false => 0xA6,
                },
                []
            ),
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=PIXEL_COL_MAX, 0..=PIXEL_COL_MAX) => ok_command!(arg_buf, 0x21, [start, end]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetPageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) => ok_command!(arg_buf, 0x22, [start, end]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetupHorizontalScroll(direction, start, stop) => match (start, stop) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= stop => ok_command!(
                    arg_buf,
                    match direction {
                        ScrollDirection::Right => 0x26,
                        ScrollDirection::Left => 0x27,
                    },
                    // Dummy bytes and the fixed frame-interval/terminator operands
                    // the controller requires around the page bounds.
                    [0x00, start, 0x00, stop, 0x00, 0xFF]
                ),
                _ => Err(Error::OutOfRange),
            },
            Command::SetScrollActive(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x2F,
                    false => 0x2E,
                },
                []
            ),
        }?;
        iface.send_command(cmd).map_err(Error::Comm)?;
        for &arg in data {
            iface.send_command(arg).map_err(Error::Comm)?;
        }
        Ok(())
    }
}
