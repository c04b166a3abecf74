//! DIO line identifiers and pending-line sets.

/// Number of DIO interrupt lines on an SX127x modem.
pub const DIO_LINE_COUNT: usize = 6;

/// One of the modem's digital interrupt lines.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DioLine {
    /// DIO0. RxDone / TxDone / CadDone in LoRa mode.
    Dio0 = 0,
    /// DIO1. RxTimeout / FhssChangeChannel / CadDetected.
    Dio1 = 1,
    /// DIO2. FhssChangeChannel.
    Dio2 = 2,
    /// DIO3. CadDone / ValidHeader / PayloadCrcError.
    Dio3 = 3,
    /// DIO4. CadDetected / PllLock.
    Dio4 = 4,
    /// DIO5. ModeReady / ClkOut.
    Dio5 = 5,
}

impl DioLine {
    /// All lines, lowest identifier first.
    pub const ALL: [DioLine; DIO_LINE_COUNT] = [
        DioLine::Dio0,
        DioLine::Dio1,
        DioLine::Dio2,
        DioLine::Dio3,
        DioLine::Dio4,
        DioLine::Dio5,
    ];

    /// The line identifier in `0..=5`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The line's bit in a [`DioSet`].
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A `u8` that does not name a DIO line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidDioLine(pub u8);

impl TryFrom<u8> for DioLine {
    type Error = InvalidDioLine;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        DioLine::ALL
            .get(index as usize)
            .copied()
            .ok_or(InvalidDioLine(index))
    }
}

impl From<DioLine> for u8 {
    fn from(line: DioLine) -> Self {
        line.index()
    }
}

/// Order in which the lines of one snapshot are handed to radio processing.
///
/// When several lines are pending together (e.g. RxDone on DIO0 and
/// RxTimeout on DIO1) the order decides which handler the radio state machine
/// sees first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DispatchOrder {
    /// DIO0 first, DIO5 last.
    #[default]
    LowestFirst,
    /// DIO5 first, DIO0 last.
    HighestFirst,
}

/// A set of DIO lines, stored as a bit mask (bit `n` is DIO`n`).
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct DioSet {
    inner: u8,
}

impl DioSet {
    const VALID: u8 = (1 << DIO_LINE_COUNT) - 1;

    /// Creates an empty set.
    pub const fn none() -> Self {
        Self { inner: 0 }
    }

    /// Creates a set containing all six lines.
    pub const fn all() -> Self {
        Self { inner: Self::VALID }
    }

    /// Adds a line to the set.
    pub const fn combine(self, line: DioLine) -> Self {
        Self {
            inner: self.inner | line.bit(),
        }
    }

    /// Lines present in both sets.
    pub const fn intersect(self, other: DioSet) -> Self {
        Self {
            inner: self.inner & other.inner,
        }
    }

    /// Lines present in either set.
    pub const fn union(self, other: DioSet) -> Self {
        Self {
            inner: self.inner | other.inner,
        }
    }

    /// Lines of `self` that are not in `other`.
    pub const fn difference(self, other: DioSet) -> Self {
        Self {
            inner: self.inner & !other.inner,
        }
    }

    /// Returns `true` if `line` is in the set.
    pub const fn contains(self, line: DioLine) -> bool {
        self.inner & line.bit() != 0
    }

    /// Returns `true` if no line is set.
    pub const fn is_empty(self) -> bool {
        self.inner == 0
    }

    /// Number of lines in the set.
    pub const fn len(self) -> usize {
        self.inner.count_ones() as usize
    }

    /// The lowest-numbered line, if any.
    pub fn first(self) -> Option<DioLine> {
        if self.is_empty() {
            return None;
        }
        DioLine::try_from(self.inner.trailing_zeros() as u8).ok()
    }

    /// The highest-numbered line, if any.
    pub fn last(self) -> Option<DioLine> {
        if self.is_empty() {
            return None;
        }
        DioLine::try_from(7 - self.inner.leading_zeros() as u8).ok()
    }

    /// Iterates over the lines, lowest first.
    pub fn iter(self) -> Lines {
        self.iter_in(DispatchOrder::LowestFirst)
    }

    /// Iterates over the lines in the given order.
    pub fn iter_in(self, order: DispatchOrder) -> Lines {
        Lines { rest: self, order }
    }
}

impl From<DioLine> for DioSet {
    fn from(line: DioLine) -> Self {
        DioSet::none().combine(line)
    }
}

impl From<DioSet> for u8 {
    fn from(set: DioSet) -> Self {
        set.inner
    }
}

/// Bits above DIO5 are dropped.
impl From<u8> for DioSet {
    fn from(mask: u8) -> Self {
        Self {
            inner: mask & Self::VALID,
        }
    }
}

impl FromIterator<DioLine> for DioSet {
    fn from_iter<I: IntoIterator<Item = DioLine>>(iter: I) -> Self {
        iter.into_iter().fold(DioSet::none(), DioSet::combine)
    }
}

impl IntoIterator for DioSet {
    type Item = DioLine;
    type IntoIter = Lines;

    fn into_iter(self) -> Lines {
        self.iter()
    }
}

impl core::fmt::Debug for DioSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter().map(DioLine::index)).finish()
    }
}

/// Iterator over the lines of a [`DioSet`].
#[derive(Clone)]
pub struct Lines {
    rest: DioSet,
    order: DispatchOrder,
}

impl Iterator for Lines {
    type Item = DioLine;

    fn next(&mut self) -> Option<DioLine> {
        let line = match self.order {
            DispatchOrder::LowestFirst => self.rest.first(),
            DispatchOrder::HighestFirst => self.rest.last(),
        }?;
        self.rest = self.rest.difference(line.into());
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl ExactSizeIterator for Lines {}
