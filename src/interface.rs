/// The bus seam between the driver and the physical transport. Command bytes and
/// display RAM bytes travel with different framing, so the two are kept distinct all
/// the way down to the wire.
pub trait DisplayInterface {
    type Error;
    /// Send a single command or command-operand byte.
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;
    /// Send display RAM bytes.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
    /// Read the one-byte controller status register.
    fn read_status(&mut self) -> Result<u8, Self::Error>;
}

pub mod i2c {
    //! The I2C interface to the controller. Every transmitted byte is preceded by a
    //! control byte that marks it as either a command or display RAM data; a status
    //! read is a plain one-byte read from the device address.

    use embedded_hal::blocking::i2c;

    use super::DisplayInterface;

    /// Control byte announcing that the byte following it is a command.
    const CONTROL_COMMAND: u8 = 0x00;
    /// Control byte announcing that the byte following it is display RAM data.
    const CONTROL_DATA: u8 = 0x40;

    pub struct I2cInterface<I2C> {
        /// The I2C master device the display module is wired to.
        i2c: I2C,
        /// The module's 7-bit bus address, usually `consts::DEFAULT_I2C_ADDRESS`.
        address: u8,
    }

    impl<I2C> I2cInterface<I2C> {
        /// Create a new I2C interface to communicate with the display driver. `i2c`
        /// is the I2C master device, and `address` is the display module's bus
        /// address.
        pub fn new(i2c: I2C, address: u8) -> Self {
            Self { i2c, address }
        }
    }

    impl<I2C, E> DisplayInterface for I2cInterface<I2C>
    where
        I2C: i2c::Write<Error = E> + i2c::Read<Error = E>,
    {
        type Error = E;

        fn send_command(&mut self, cmd: u8) -> Result<(), E> {
            self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), E> {
            // The controller re-latches the control byte on every start condition,
            // so each RAM byte travels in its own two-byte write.
            for &byte in buf {
                self.i2c.write(self.address, &[CONTROL_DATA, byte])?;
            }
            Ok(())
        }

        fn read_status(&mut self) -> Result<u8, E> {
            let mut status = [0u8; 1];
            self.i2c.read(self.address, &mut status)?;
            Ok(status[0])
        }
    }
}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it, and to
    //! script the status bytes returned to the driver's ready poll.

    use super::DisplayInterface;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Cmd(u8),
        Data(Vec<u8>),
    }

    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
        status_queue: Rc<RefCell<VecDeque<u8>>>,
        idle_status: Rc<RefCell<u8>>,
        status_reads: Rc<RefCell<usize>>,
        ops_until_failure: Rc<RefCell<Option<usize>>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
                status_queue: Rc::new(RefCell::new(VecDeque::new())),
                idle_status: Rc::new(RefCell::new(0x00)),
                status_reads: Rc::new(RefCell::new(0)),
                ops_until_failure: Rc::new(RefCell::new(None)),
            }
        }

        /// Make another handle onto the same spy, so one can be moved into the
        /// display under test while the original stays behind for assertions.
        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: self.sent.clone(),
                status_queue: self.status_queue.clone(),
                idle_status: self.idle_status.clone(),
                status_reads: self.status_reads.clone(),
                ops_until_failure: self.ops_until_failure.clone(),
            }
        }

        pub fn clear(&mut self) {
            self.sent.borrow_mut().clear()
        }

        /// Check that exactly one command was sent: the opcode `cmd` followed by the
        /// operand bytes `args`, all framed as command writes.
        pub fn check(&self, cmd: u8, args: &[u8]) {
            let mut expect = vec![Sent::Cmd(cmd)];
            expect.extend(args.iter().map(|&b| Sent::Cmd(b)));
            assert_eq!(*self.sent.borrow(), expect);
        }

        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(self.sent.borrow().as_slice(), expect);
        }

        /// Queue a status byte; each read consumes one. Once the queue is empty,
        /// reads return the idle status (default 0x00, i.e. ready).
        pub fn queue_status(&self, byte: u8) {
            self.status_queue.borrow_mut().push_back(byte);
        }

        pub fn set_idle_status(&self, byte: u8) {
            *self.idle_status.borrow_mut() = byte;
        }

        pub fn status_reads(&self) -> usize {
            *self.status_reads.borrow()
        }

        /// Make the bus fail: the next `ops` interface calls succeed, and the one
        /// after them returns `Err(())`, as a NACKing or absent device would.
        pub fn fail_after(&self, ops: usize) {
            *self.ops_until_failure.borrow_mut() = Some(ops);
        }

        fn tick(&self) -> Result<(), ()> {
            match *self.ops_until_failure.borrow_mut() {
                Some(0) => Err(()),
                Some(ref mut n) => {
                    *n -= 1;
                    Ok(())
                }
                None => Ok(()),
            }
        }
    }

    impl DisplayInterface for TestSpyInterface {
        type Error = ();

        fn send_command(&mut self, cmd: u8) -> Result<(), ()> {
            self.tick()?;
            self.sent.borrow_mut().push(Sent::Cmd(cmd));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), ()> {
            self.tick()?;
            self.sent.borrow_mut().push(Sent::Data(data.to_vec()));
            Ok(())
        }

        fn read_status(&mut self) -> Result<u8, ()> {
            *self.status_reads.borrow_mut() += 1;
            self.tick()?;
            let byte = self
                .status_queue
                .borrow_mut()
                .pop_front()
                .unwrap_or(*self.idle_status.borrow());
            Ok(byte)
        }
    }
}
