//! The main API to the display driver. It owns the framebuffer and the bus
//! interface, exposes the drawing primitives, and sequences the controller
//! protocol around frame pushes.


use crate::command::consts::*;
use crate::command::{Command, ScrollDirection};
use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::{Color, Framebuffer};
use crate::interface;

/// Maximum number of status reads one ready-wait will issue before giving up with
/// `Error::ReadyTimeout`. The controller clears its busy flag within a handful of
/// internal refresh cycles, each far shorter than a bus transaction, so a budget
/// this large only runs out when the bus or the panel is wedged.
pub const MAX_READY_POLLS: u32 = 10_000;

/// A driver for an SSD1306 display.
///
/// The driver owns its framebuffer exclusively; `&mut self` on every operation
/// keeps both the buffer and the bus single-writer. Drawing operations mutate only
/// memory and cannot fail; only operations that reach the bus return `Result`.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    frame: Framebuffer,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver connected to the interface `iface`, with an
    /// all-off framebuffer.
    pub fn new(iface: DI) -> Self {
        Display {
            iface,
            frame: Framebuffer::new(),
        }
    }

    /// Run the controller power-up sequence with the register values in `config`.
    ///
    /// The controller is a configuration state machine: these registers must be
    /// written in this order relative to display-on, and the sequence must run
    /// exactly once per session, before the first `flush`.
    pub fn init(&mut self, config: Config) -> Result<(), Error<DI::Error>> {
        Command::SetDisplayOn(false).send(&mut self.iface)?;
        Command::SetDisplayClockDivide(config.clock_divide).send(&mut self.iface)?;
        Command::SetMultiplexRatio(NUM_PIXEL_ROWS as u8).send(&mut self.iface)?;
        Command::SetDisplayOffset(0).send(&mut self.iface)?;
        Command::SetStartLine(0).send(&mut self.iface)?;
        Command::SetChargePump(config.charge_pump).send(&mut self.iface)?;
        Command::SetMemoryMode(config.memory_mode).send(&mut self.iface)?;
        Command::SetSegmentRemap(config.segment_remap).send(&mut self.iface)?;
        Command::SetComScanDirection(config.com_scan_direction).send(&mut self.iface)?;
        Command::SetComPinConfig(config.com_pin_config).send(&mut self.iface)?;
        Command::SetContrast(config.contrast).send(&mut self.iface)?;
        let (phase_1, phase_2) = config.precharge_phases;
        Command::SetPrechargePeriod(phase_1, phase_2).send(&mut self.iface)?;
        Command::SetVcomhDeselectLevel(config.vcomh_deselect_level).send(&mut self.iface)?;
        Command::SetEntireDisplayOn(false).send(&mut self.iface)?;
        Command::SetInversion(false).send(&mut self.iface)?;
        Command::SetDisplayOn(true).send(&mut self.iface)
    }

    /// One non-blocking probe of the controller busy flag. Returns `WouldBlock`
    /// while the controller is still mid-operation, making this the suspension
    /// point for callers who want to interleave other work with the ready wait.
    pub fn poll_ready(&mut self) -> nb::Result<(), DI::Error> {
        let status = self.iface.read_status().map_err(nb::Error::Other)?;
        // The busy flag is bit 7 of the status byte; while it is set the
        // controller has not finished its current operation.
        if status & 0x80 != 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    // Bounded ready-wait guarding every operation that claims the RAM addressing
    // window. The transport runs asynchronously to the controller's refresh cycle;
    // writing the window while busy tears the frame or drops commands.
    fn wait_until_ready(&mut self) -> Result<(), Error<DI::Error>> {
        for _ in 0..MAX_READY_POLLS {
            match self.poll_ready() {
                Ok(()) => return Ok(()),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(e)) => return Err(Error::Comm(e)),
            }
        }
        Err(Error::ReadyTimeout)
    }

    /// Push the framebuffer to the panel: wait until the controller is ready, set
    /// the addressing window to the whole panel, and stream every RAM byte. There
    /// is no partial update path; each flush transmits the complete buffer.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        self.wait_until_ready()?;
        Command::SetColumnAddress(0, PIXEL_COL_MAX).send(&mut self.iface)?;
        Command::SetPageAddress(0, PAGE_MAX).send(&mut self.iface)?;
        self.iface
            .send_data(self.frame.as_bytes())
            .map_err(Error::Comm)
    }

    /// Drop the contrast to minimum (`dim == true`) or restore the bright level.
    /// Contrast does not touch the RAM addressing window, so no ready-wait is
    /// involved.
    pub fn dim(&mut self, dim: bool) -> Result<(), Error<DI::Error>> {
        let contrast = if dim { 0x00 } else { 0xCF };
        Command::SetContrast(contrast).send(&mut self.iface)
    }

    /// Switch the panel between inverted and normal polarity. Affects the whole
    /// panel immediately without touching RAM.
    pub fn invert(&mut self, inverted: bool) -> Result<(), Error<DI::Error>> {
        Command::SetInversion(inverted).send(&mut self.iface)
    }

    /// Start a continuous rightward scroll of pages `start_page` through
    /// `stop_page`, inclusive.
    pub fn scroll_right(&mut self, start_page: u8, stop_page: u8) -> Result<(), Error<DI::Error>> {
        self.scroll_horizontal(ScrollDirection::Right, start_page, stop_page)
    }

    /// Start a continuous leftward scroll of pages `start_page` through
    /// `stop_page`, inclusive.
    pub fn scroll_left(&mut self, start_page: u8, stop_page: u8) -> Result<(), Error<DI::Error>> {
        self.scroll_horizontal(ScrollDirection::Left, start_page, stop_page)
    }

    fn scroll_horizontal(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        stop_page: u8,
    ) -> Result<(), Error<DI::Error>> {
        self.wait_until_ready()?;
        Command::SetupHorizontalScroll(direction, start_page, stop_page).send(&mut self.iface)?;
        Command::SetScrollActive(true).send(&mut self.iface)
    }

    /// Halt any active scroll. Sent unconditionally: deactivation does not claim
    /// the RAM window, and the datasheet requires rewriting RAM afterwards anyway.
    pub fn stop_scroll(&mut self) -> Result<(), Error<DI::Error>> {
        Command::SetScrollActive(false).send(&mut self.iface)
    }

    /// Reset every framebuffer pixel to off. In-memory only; `flush` to blank the
    /// panel itself.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// See `Framebuffer::set_pixel`.
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.frame.set_pixel(x, y, color);
    }

    /// See `Framebuffer::set_pixels`.
    pub fn set_pixels<I>(&mut self, pixels: I)
    where
        I: IntoIterator<Item = (i16, i16, Color)>,
    {
        self.frame.set_pixels(pixels);
    }

    /// See `Framebuffer::draw_line`.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        self.frame.draw_line(x0, y0, x1, y1);
    }

    /// See `Framebuffer::draw_bitmap`.
    pub fn draw_bitmap<I, C>(&mut self, pixels: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        self.frame.draw_bitmap(pixels);
    }

    /// Replace the framebuffer contents with an already-packed byte sequence. See
    /// `Framebuffer::load`.
    pub fn load_frame(&mut self, bytes: &[u8]) {
        self.frame.load(bytes);
    }

    /// The framebuffer that the next `flush` will push.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.frame
    }

    /// Mutable access to the framebuffer, for drawing code that wants to work on
    /// it directly.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.frame
    }
}
