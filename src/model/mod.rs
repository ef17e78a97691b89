//! The topology snapshot and its entity-resolution queries.
//!
//! A [`World`] is a point-in-time picture of a monitored system: nodes,
//! applications with their instances, and services with their observed
//! connections. A snapshot builder populates it once per evaluation cycle;
//! afterwards it is read-only and any number of readers may query it.

mod application;
mod node;
mod pod;
mod service;
mod world;

pub use application::{Application, ApplicationId, Instance, Listen};
pub use node::Node;
pub use pod::{Container, Pod, PodPhase};
pub use service::{Connection, Service};
pub use world::World;
