//! Circabri is a CIRCumscription-based ABstract argumentation Reasoner Implementation.
//!
//! Argumentation frameworks are encoded into circumscription problems (ccnf instances),
//! which are solved by an external circumscription solver.

#![warn(missing_docs)]

pub mod aa;

pub mod circ;

pub mod encodings;

pub mod io;

pub mod solvers;
