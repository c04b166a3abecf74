//! The six DIO interrupt handlers and their registration.
//!
//! Each handler only posts its line to [`DioEvents`]. It carries no payload
//! and never touches the chip: everything the radio needs is read back from
//! the IRQ flag registers on the dispatch task.

use crate::op::{DioLine, DioSet, DIO_LINE_COUNT};

use super::DioEvents;

/// An interrupt-context handler for one DIO line.
pub type DioIrqHandler = fn(&DioEvents);

macro_rules! dio_irq_handlers {
    ($($name:ident => $line:ident),* $(,)?) => {
        $(
            #[doc = concat!("Interrupt handler for `", stringify!($line), "`.")]
            pub fn $name(events: &DioEvents) {
                events.post(DioLine::$line);
            }
        )*
    };
}

dio_irq_handlers! {
    on_dio0_irq => Dio0,
    on_dio1_irq => Dio1,
    on_dio2_irq => Dio2,
    on_dio3_irq => Dio3,
    on_dio4_irq => Dio4,
    on_dio5_irq => Dio5,
}

/// The handlers indexed by line identifier.
pub const DIO_IRQ_HANDLERS: [DioIrqHandler; DIO_LINE_COUNT] = [
    on_dio0_irq,
    on_dio1_irq,
    on_dio2_irq,
    on_dio3_irq,
    on_dio4_irq,
    on_dio5_irq,
];

/// The handler of `line`.
pub fn handler_for(line: DioLine) -> DioIrqHandler {
    DIO_IRQ_HANDLERS[line.index() as usize]
}

/// A DIO handler bound to the aggregator it posts to.
///
/// This is what gets registered with the GPIO interrupt layer.
#[derive(Copy, Clone)]
pub struct DioIrq<'a> {
    events: &'a DioEvents,
    line: DioLine,
    handler: DioIrqHandler,
}

impl<'a> DioIrq<'a> {
    pub(crate) fn new(events: &'a DioEvents, line: DioLine) -> Self {
        Self {
            events,
            line,
            handler: handler_for(line),
        }
    }

    /// The line this handler reports.
    pub fn line(&self) -> DioLine {
        self.line
    }

    /// Runs the handler. Interrupt-safe.
    #[inline]
    pub fn fire(&self) {
        (self.handler)(self.events)
    }

    /// Runs the handler, ignoring the per-call argument the GPIO layer passes.
    #[inline]
    pub fn fire_with<A>(&self, _arg: A) {
        self.fire()
    }
}

impl core::fmt::Debug for DioIrq<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DioIrq").field("line", &self.line).finish()
    }
}

/// The GPIO interrupt layer the handlers are registered with.
pub trait DioIrqRegistry<'a> {
    /// Registration error type.
    type Error;

    /// Routes the edge interrupt of `irq.line()` to `irq` and enables it.
    fn attach(&mut self, irq: DioIrq<'a>) -> Result<(), Self::Error>;
}

/// The handlers of the enabled lines, handed out by [`init`](crate::init)
/// once the dispatch task is running.
pub struct DioIrqs<'a> {
    events: &'a DioEvents,
    enabled: DioSet,
}

impl<'a> DioIrqs<'a> {
    pub(crate) fn new(events: &'a DioEvents, enabled: DioSet) -> Self {
        Self { events, enabled }
    }

    /// Lines that have a handler.
    pub fn enabled(&self) -> DioSet {
        self.enabled
    }

    /// The handler of `line`, or `None` if the line is not enabled.
    pub fn get(&self, line: DioLine) -> Option<DioIrq<'a>> {
        self.enabled
            .contains(line)
            .then(|| DioIrq::new(self.events, line))
    }

    /// The handlers of all enabled lines, lowest line first.
    pub fn iter(&self) -> impl Iterator<Item = DioIrq<'a>> + '_ {
        self.enabled
            .iter()
            .map(move |line| DioIrq::new(self.events, line))
    }

    /// Attaches every enabled line to `registry`, stopping at the first error.
    pub fn arm<R: DioIrqRegistry<'a>>(&self, registry: &mut R) -> Result<(), R::Error> {
        for irq in self.iter() {
            registry.attach(irq)?;
            log::debug!("lora::irq armed {:?}", irq.line());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_handler_posts_its_own_line() {
        for line in DioLine::ALL {
            let events = DioEvents::new();
            handler_for(line)(&events);
            assert_eq!(events.pending(), DioSet::from(line));
        }
    }

    #[test]
    fn disabled_lines_have_no_handler() {
        let events = DioEvents::new();
        let irqs = DioIrqs::new(&events, DioSet::from(0b0000_0101u8));

        assert!(irqs.get(DioLine::Dio1).is_none());
        let irq = irqs.get(DioLine::Dio2).expect("DIO2 enabled");
        irq.fire_with(core::ptr::null::<()>());
        assert_eq!(events.pending(), DioSet::from(DioLine::Dio2));
        assert_eq!(irqs.iter().count(), 2);
    }
}
