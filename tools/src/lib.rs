//! Trace replay and debugging tools for uisync.
//!
//! A trace is a JSON list of request cycles. Each cycle carries the request
//! parameters the client submitted and the property values the application
//! set on its objects. Replaying a trace drives the full pipeline and
//! reports the operations each cycle would send.
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see why an operation was sent.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{CodecLimits, Session};
use schema::{ObjectId, PropertySet, PropertyValue, Rectangle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wire::{ObjectMessage, Operation};

/// A recorded sequence of request cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub cycles: Vec<TraceCycle>,
}

/// One request cycle of a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceCycle {
    /// Request parameters submitted by the client.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Objects disposed before the cycle starts.
    #[serde(default)]
    pub dispose: Vec<ObjectId>,
    /// Objects the application touched, in render order.
    #[serde(default)]
    pub objects: Vec<TraceObject>,
    /// Simulates a failed request: the cycle is aborted instead of committed.
    #[serde(default)]
    pub abort: bool,
}

/// The state the application set on one object during a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceObject {
    pub id: ObjectId,
    #[serde(default)]
    pub bounds: Option<Rectangle>,
    #[serde(default)]
    pub properties: Vec<TraceProperty>,
    #[serde(default)]
    pub listeners: Vec<TraceListener>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceProperty {
    pub name: String,
    pub value: PropertyValue,
    /// Client default; falls back to the common widget defaults.
    #[serde(default)]
    pub default: Option<PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceListener {
    pub name: String,
    pub attached: bool,
}

/// What one replayed cycle produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub cycle: u32,
    pub committed: bool,
    pub objects: Vec<ObjectMessage>,
}

/// Replay output for a whole trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub cycles: Vec<CycleReport>,
}

impl ReplayReport {
    /// Total operations sent across committed cycles.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.cycles
            .iter()
            .filter(|cycle| cycle.committed)
            .flat_map(|cycle| &cycle.objects)
            .map(ObjectMessage::len)
            .sum()
    }
}

/// Server-side state of one object as the application last set it.
#[derive(Debug)]
struct LiveObject {
    id: ObjectId,
    bounds: Option<Rectangle>,
    properties: Vec<(String, PropertyValue, PropertyValue)>,
    listeners: Vec<(String, bool)>,
}

impl LiveObject {
    fn new(id: ObjectId) -> Self {
        Self {
            id,
            bounds: None,
            properties: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn apply(&mut self, update: &TraceObject, defaults: &PropertySet) {
        if let Some(bounds) = update.bounds {
            self.bounds = Some(bounds);
        }
        for prop in &update.properties {
            let default = prop
                .default
                .clone()
                .unwrap_or_else(|| defaults.default_for(&prop.name));
            match self.properties.iter_mut().find(|(name, ..)| *name == prop.name) {
                Some(slot) => {
                    slot.1 = prop.value.clone();
                    slot.2 = default;
                }
                None => self
                    .properties
                    .push((prop.name.clone(), prop.value.clone(), default)),
            }
        }
        for listener in &update.listeners {
            match self.listeners.iter_mut().find(|(name, _)| *name == listener.name) {
                Some(slot) => slot.1 = listener.attached,
                None => self.listeners.push((listener.name.clone(), listener.attached)),
            }
        }
    }
}

/// Drives a session through a trace.
pub struct Replayer {
    session: Session,
    live: Vec<LiveObject>,
    defaults: PropertySet,
}

impl Replayer {
    #[must_use]
    pub fn new(limits: CodecLimits, wire_limits: wire::Limits) -> Self {
        Self {
            session: Session::with_limits(limits, wire_limits),
            live: Vec::new(),
            defaults: PropertySet::common(),
        }
    }

    /// Replays one cycle: decode, preserve, apply, render, then commit.
    pub fn run_cycle(&mut self, cycle: &TraceCycle) -> Result<CycleReport> {
        for id in &cycle.dispose {
            self.session
                .dispose(id)
                .with_context(|| format!("dispose {id}"))?;
            self.live.retain(|object| object.id != *id);
        }
        for update in &cycle.objects {
            if self.find(&update.id).is_none() {
                self.session
                    .register(update.id.clone())
                    .with_context(|| format!("register {}", update.id))?;
                self.live.push(LiveObject::new(update.id.clone()));
            }
        }

        let decoder = self.session.decoder(&cycle.params);
        for object in &mut self.live {
            if let Some(bounds) = object.bounds {
                object.bounds = Some(
                    decoder
                        .read_bounds(&object.id, &bounds)
                        .with_context(|| format!("read bounds of {}", object.id))?,
                );
            }
        }

        let number = self.session.begin_cycle()?.raw();
        debug!(cycle = number, objects = cycle.objects.len(), "replaying cycle");

        for update in &cycle.objects {
            let Some(object) = self.live.iter().find(|object| object.id == update.id) else {
                continue;
            };
            let mut preserver = self.session.preserve(&object.id)?;
            if let Some(bounds) = object.bounds {
                preserver.preserve_bounds(bounds);
            }
            for (name, value, _) in &object.properties {
                preserver.preserve_property(name, value.clone());
            }
            for (name, attached) in &object.listeners {
                preserver.preserve_listener(name, *attached);
            }
        }

        for update in &cycle.objects {
            if let Some(object) = self.live.iter_mut().find(|object| object.id == update.id) {
                object.apply(update, &self.defaults);
            }
        }

        let rendered = self.render_touched(cycle);
        if let Err(err) = rendered {
            self.session.abort()?;
            return Err(err);
        }

        if cycle.abort {
            self.session.abort()?;
            return Ok(CycleReport {
                cycle: number,
                committed: false,
                objects: Vec::new(),
            });
        }
        let message = self.session.commit()?;
        Ok(CycleReport {
            cycle: message.cycle,
            committed: true,
            objects: message.objects,
        })
    }

    fn render_touched(&mut self, cycle: &TraceCycle) -> Result<()> {
        for update in &cycle.objects {
            let Some(object) = self.live.iter().find(|object| object.id == update.id) else {
                continue;
            };
            self.session
                .render(&object.id, |r| {
                    if let Some(bounds) = &object.bounds {
                        r.render_bounds(bounds)?;
                    }
                    for (name, value, default) in &object.properties {
                        r.render_property(name, value.clone(), default.clone())?;
                    }
                    for (name, attached) in &object.listeners {
                        r.render_listener(name, *attached, false)?;
                    }
                    Ok(())
                })
                .with_context(|| format!("render {}", object.id))?;
        }
        Ok(())
    }

    fn find(&self, id: &ObjectId) -> Option<&LiveObject> {
        self.live.iter().find(|object| object.id == *id)
    }
}

/// Replays every cycle of `trace`.
pub fn replay_trace(
    trace: &Trace,
    limits: CodecLimits,
    wire_limits: wire::Limits,
) -> Result<ReplayReport> {
    let mut replayer = Replayer::new(limits, wire_limits);
    let mut report = ReplayReport::default();
    for (idx, cycle) in trace.cycles.iter().enumerate() {
        let outcome = replayer
            .run_cycle(cycle)
            .with_context(|| format!("cycle #{}", idx + 1))?;
        report.cycles.push(outcome);
    }
    info!(
        cycles = report.cycles.len(),
        operations = report.operation_count(),
        "trace replayed"
    );
    Ok(report)
}

/// Parses a trace document.
pub fn parse_trace(json: &str) -> Result<Trace> {
    serde_json::from_str(json).context("parse trace json")
}

/// Renders a report as indented text, one operation per line.
#[must_use]
pub fn format_pretty(report: &ReplayReport) -> String {
    let mut out = String::new();
    for cycle in &report.cycles {
        let status = if cycle.committed { "" } else { " (aborted)" };
        let _ = writeln!(out, "cycle {}{status}", cycle.cycle);
        for object in &cycle.objects {
            let _ = writeln!(out, "  {}", object.target);
            for op in &object.operations {
                match op {
                    Operation::Set { name, value } => {
                        let value = serde_json::to_string(value).unwrap_or_default();
                        let _ = writeln!(out, "    set {name} = {value}");
                    }
                    Operation::Listen { name, attached } => {
                        let state = if *attached { "on" } else { "off" };
                        let _ = writeln!(out, "    listen {name} = {state}");
                    }
                }
            }
        }
    }
    out
}
