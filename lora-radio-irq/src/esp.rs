//! DIO interrupt wiring for esp-hal boards.
//!
//! ```ignore
//! let mut io = Io::new(peripherals.IO_MUX);
//! let mut pins = EspDioPins::new(&mut io)
//!     .with_pin(DioLine::Dio0, Input::new(peripherals.GPIO5, InputConfig::default()))
//!     .with_pin(DioLine::Dio1, Input::new(peripherals.GPIO7, InputConfig::default()));
//! irqs.arm(&mut pins)?;
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::gpio::{Event, Input, Io};
use esp_hal::handler;

use crate::irq::{DioIrq, DioIrqRegistry};
use crate::op::{DioLine, DIO_LINE_COUNT};

struct ArmedPin {
    pin: Input<'static>,
    irq: DioIrq<'static>,
}

static ARMED: Mutex<RefCell<[Option<ArmedPin>; DIO_LINE_COUNT]>> =
    Mutex::new(RefCell::new([const { None }; DIO_LINE_COUNT]));

/// A DIO line was armed without a GPIO input assigned to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnwiredLine(pub DioLine);

/// The GPIO inputs the modem's DIO lines are wired to.
pub struct EspDioPins {
    pins: [Option<Input<'static>>; DIO_LINE_COUNT],
}

impl EspDioPins {
    /// Installs the GPIO interrupt handler. Pins are added with
    /// [`with_pin`](Self::with_pin).
    pub fn new(io: &mut Io<'_>) -> Self {
        io.set_interrupt_handler(dio_gpio_handler);
        Self {
            pins: [const { None }; DIO_LINE_COUNT],
        }
    }

    /// Assigns the input wired to `line`.
    pub fn with_pin(mut self, line: DioLine, pin: Input<'static>) -> Self {
        self.pins[line.index() as usize] = Some(pin);
        self
    }
}

impl DioIrqRegistry<'static> for EspDioPins {
    type Error = UnwiredLine;

    fn attach(&mut self, irq: DioIrq<'static>) -> Result<(), Self::Error> {
        let slot = irq.line().index() as usize;
        let mut pin = self.pins[slot].take().ok_or(UnwiredLine(irq.line()))?;
        critical_section::with(|cs| {
            pin.listen(Event::RisingEdge);
            ARMED.borrow_ref_mut(cs)[slot] = Some(ArmedPin { pin, irq });
        });
        Ok(())
    }
}

#[handler]
fn dio_gpio_handler() {
    critical_section::with(|cs| {
        for armed in ARMED.borrow_ref_mut(cs).iter_mut().flatten() {
            if armed.pin.is_interrupt_set() {
                armed.pin.clear_interrupt();
                armed.irq.fire();
            }
        }
    });
}
