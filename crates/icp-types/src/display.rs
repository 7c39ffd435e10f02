use serde::{Deserialize, Serialize};

/// Bit set in the `disable` mask when the frame is turned off.
pub const DISABLE_FRAME: u32 = 1;
/// Bit set in the `disable` mask when the download button is turned off.
pub const DISABLE_DOWNLOAD: u32 = 2;
/// Bit set in the `disable` mask when the copyright button is turned off.
pub const DISABLE_COPYRIGHT: u32 = 8;

/// Viewer chrome toggles for a piece of content.
///
/// `download` and `copyright` live inside the frame: when `frame` is off they
/// are kept as entered but are not in effect. That is a presentation rule,
/// never a validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub frame: bool,
    pub download: bool,
    pub copyright: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            frame: true,
            download: true,
            copyright: true,
        }
    }
}

impl DisplayOptions {
    /// Decode the host's stored `disable` bitmask.
    pub fn from_disable(disable: u32) -> Self {
        Self {
            frame: disable & DISABLE_FRAME == 0,
            download: disable & DISABLE_DOWNLOAD == 0,
            copyright: disable & DISABLE_COPYRIGHT == 0,
        }
    }

    /// Encode as the host's `disable` bitmask. Bits outside the three known
    /// options are never set.
    pub fn to_disable(&self) -> u32 {
        let mut disable = 0;
        if !self.frame {
            disable |= DISABLE_FRAME;
        }
        if !self.download {
            disable |= DISABLE_DOWNLOAD;
        }
        if !self.copyright {
            disable |= DISABLE_COPYRIGHT;
        }
        disable
    }

    /// The options as the viewer will apply them.
    pub fn effective(&self) -> Self {
        Self {
            frame: self.frame,
            download: self.frame && self.download,
            copyright: self.frame && self.copyright,
        }
    }
}
