//! Per-session cycle driver.
//!
//! A cycle runs `begin_cycle`, then any number of `preserve` and `render`
//! calls, then either `commit` or `abort`. Operations are buffered per
//! object and only kept when that object's render step succeeds.

use schema::ObjectId;
use tracing::debug;
use wire::{Message, ObjectMessage, Operation, OutboundChannel};

use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::preserve::{ObjectPreserver, PreservedStore};
use crate::render::ObjectRenderer;
use crate::request::{ParameterSource, RequestDecoder};
use crate::types::RequestCycle;

/// Session state: preserved baselines plus the open cycle, if any.
#[derive(Debug)]
pub struct Session {
    store: PreservedStore,
    limits: CodecLimits,
    wire_limits: wire::Limits,
    cycle: RequestCycle,
    active: bool,
    pending: Vec<ObjectMessage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(CodecLimits::default(), wire::Limits::default())
    }

    #[must_use]
    pub fn with_limits(limits: CodecLimits, wire_limits: wire::Limits) -> Self {
        Self {
            store: PreservedStore::new(limits.max_objects),
            limits,
            wire_limits,
            cycle: RequestCycle::default(),
            active: false,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &PreservedStore {
        &self.store
    }

    #[must_use]
    pub const fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// The current cycle, or the last one if none is open.
    #[must_use]
    pub const fn cycle(&self) -> RequestCycle {
        self.cycle
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn register(&mut self, id: impl Into<ObjectId>) -> CodecResult<()> {
        self.store.register(id.into())
    }

    /// Removes an object, dropping any operations it buffered this cycle.
    pub fn dispose(&mut self, id: &ObjectId) -> CodecResult<()> {
        self.store.dispose(id)?;
        self.pending.retain(|msg| msg.target != id.as_str());
        Ok(())
    }

    pub fn is_initialized(&self, id: &ObjectId) -> CodecResult<bool> {
        self.store.is_initialized(id)
    }

    /// Returns a request decoder bound to this session's limits.
    pub fn decoder<'a, P: ParameterSource + ?Sized>(&self, params: &'a P) -> RequestDecoder<'a, P> {
        RequestDecoder::with_limits(params, &self.limits)
    }

    pub fn begin_cycle(&mut self) -> CodecResult<RequestCycle> {
        if self.active {
            return Err(CodecError::CycleAlreadyActive);
        }
        self.cycle = self.cycle.next();
        self.active = true;
        debug!(cycle = self.cycle.raw(), "cycle started");
        Ok(self.cycle)
    }

    /// Opens the preserve step for `id`.
    pub fn preserve(&mut self, id: &ObjectId) -> CodecResult<ObjectPreserver<'_>> {
        self.ensure_active()?;
        Ok(ObjectPreserver::new(self.store.adapter_mut(id)?))
    }

    /// Runs the render step for `id`.
    ///
    /// Operations emitted by `f` are kept only if it returns `Ok`; on error
    /// nothing of this step is buffered and the object is not marked
    /// rendered.
    pub fn render<F>(&mut self, id: &ObjectId, f: F) -> CodecResult<()>
    where
        F: FnOnce(&mut ObjectRenderer<'_, ObjectMessage>) -> CodecResult<()>,
    {
        self.ensure_active()?;
        let adapter = self.store.adapter(id)?;
        let mut message = ObjectMessage::with_limits(id.as_str(), self.wire_limits.clone());
        f(&mut ObjectRenderer::new(adapter, &mut message))?;

        self.buffer(message)?;
        self.store.adapter_mut(id)?.mark_rendered();
        Ok(())
    }

    /// Commits the cycle: baselines advance and buffered operations are
    /// returned in render order.
    pub fn commit(&mut self) -> CodecResult<Message> {
        self.ensure_active()?;
        let initialized = self.store.commit();
        self.active = false;
        let message = Message {
            cycle: self.cycle.raw(),
            objects: std::mem::take(&mut self.pending),
        };
        debug!(
            cycle = self.cycle.raw(),
            objects = message.objects.len(),
            operations = message.operation_count(),
            initialized,
            "cycle committed"
        );
        Ok(message)
    }

    /// Aborts the cycle; the previous baselines stay authoritative.
    pub fn abort(&mut self) -> CodecResult<()> {
        self.ensure_active()?;
        self.store.rollback();
        let dropped = self.pending.len();
        self.pending.clear();
        self.active = false;
        debug!(cycle = self.cycle.raw(), dropped, "cycle aborted");
        Ok(())
    }

    const fn ensure_active(&self) -> CodecResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(CodecError::CycleNotActive)
        }
    }

    fn buffer(&mut self, message: ObjectMessage) -> CodecResult<()> {
        if message.is_empty() {
            return Ok(());
        }
        let Some(existing) = self
            .pending
            .iter_mut()
            .find(|pending| pending.target == message.target)
        else {
            self.pending.push(message);
            return Ok(());
        };
        // Merge into a copy so a failed merge leaves the pending message untouched.
        let mut merged = existing.clone();
        for op in message.operations {
            match op {
                Operation::Set { name, value } => merged.set_property(&name, value)?,
                Operation::Listen {
                    name,
                    attached: true,
                } => merged.add_listener(&name)?,
                Operation::Listen {
                    name,
                    attached: false,
                } => merged.remove_listener(&name)?,
            }
        }
        *existing = merged;
        Ok(())
    }
}
