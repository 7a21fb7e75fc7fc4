//! The three-entry prior/current/next reorder queue shared by MPEG-2 and,
//! via [`Vc1ReorderQueue`], non-B-frame VC-1 profiles (spec §4.12): a
//! single held I/P picture awaits a newer I/P picture before being handed
//! back for output, while B pictures (which never become a reference) are
//! output immediately in decode order.

/// A decoded MPEG-2/VC-1 picture as tracked by the reorder queue.
#[derive(Debug, Clone)]
pub struct Picture<P> {
    /// I or P picture: held until displaced by a newer I/P picture.
    /// B picture: output immediately, never held.
    pub is_reference: bool,
    pub payload: P,
}

impl<P> Picture<P> {
    pub fn reference(payload: P) -> Self {
        Self {
            is_reference: true,
            payload,
        }
    }

    pub fn non_reference(payload: P) -> Self {
        Self {
            is_reference: false,
            payload,
        }
    }
}

/// Holds at most one I/P picture awaiting display-order release.
#[derive(Default)]
pub struct ReorderQueue<P> {
    held: Option<Picture<P>>,
}

impl<P> ReorderQueue<P> {
    pub fn new() -> Self {
        Self { held: None }
    }

    /// Pushes a newly decoded picture. B pictures are returned for output
    /// immediately; I/P pictures displace whatever was previously held,
    /// which is returned for output.
    pub fn push(&mut self, picture: Picture<P>) -> Option<Picture<P>> {
        if picture.is_reference {
            self.held.replace(picture)
        } else {
            Some(picture)
        }
    }

    /// Releases any picture still held, for end of stream or a sequence
    /// boundary.
    pub fn flush(&mut self) -> Option<Picture<P>> {
        self.held.take()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }
}

/// VC-1's simple/main profile and non-B-frame advanced-profile reference
/// model is the same 2-deep forward/backward queue as MPEG-2's; this is a
/// direct alias rather than a duplicate implementation (spec §4.12).
pub type Vc1ReorderQueue<P> = ReorderQueue<P>;
pub type Vc1Picture<P> = Picture<P>;
