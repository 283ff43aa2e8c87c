use tracing::debug;

/// A live visual that holds renderer resources until released
pub trait Visual {
    fn release(&mut self);
}

/// Owner of at most one live visual for a logical chart position.
///
/// Replacing the visual always releases the previous one first, also when
/// creating the new one fails, and dropping the slot releases whatever it holds.
pub struct ChartSlot<H: Visual> {
    name: String,
    current: Option<H>,
}

impl<H: Visual> ChartSlot<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: None,
        }
    }

    /// Release the current visual and install the one `create` builds.
    ///
    /// On error the slot is left empty.
    pub fn replace_with<E>(&mut self, create: impl FnOnce() -> Result<H, E>) -> Result<&H, E> {
        self.clear();
        let handle = create()?;
        Ok(self.current.insert(handle))
    }

    /// Release the current visual, if any
    pub fn clear(&mut self) {
        if let Some(mut handle) = self.current.take() {
            debug!("Releasing visual in slot '{}'", self.name);
            handle.release();
        }
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<H: Visual> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}
