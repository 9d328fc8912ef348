//! Event subscription bus.
//!
//! Devices publish typed `InputEvent`s; consumers subscribe closures against
//! an `EventKey` (event kind plus device/button/modifier or axis
//! discriminator) and get back a `SubscriptionId` for later removal.

mod bus;
mod event;
mod key;

pub use bus::{EventBus, EventResponse, Handler, SubscriptionId};
pub use event::{
    AxisEvent, ButtonEvent, DeviceEvent, DeviceEventKind, DragPhase, InputEvent, MouseClickEvent,
    MouseDragEvent,
};
pub use key::{EventKey, EventKind, Secondary};
