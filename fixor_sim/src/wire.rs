use crate::PinRef;

/// A directed connection from an output pin (`from`) to an input pin (`to`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    from: PinRef,
    to: PinRef,
}

impl Wire {
    pub(crate) const fn new(from: PinRef, to: PinRef) -> Self {
        Self { from, to }
    }

    /// The driving output pin.
    pub const fn from(&self) -> PinRef {
        self.from
    }

    /// The driven input pin.
    pub const fn to(&self) -> PinRef {
        self.to
    }
}
