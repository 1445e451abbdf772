//! # Unit Components
//!
//! This module serves as the central hub for the component and scenario tests. It
//! organizes them the way the library is laid out: shared types, configuration, the
//! processor core, the ISA, and the simulation front end.
