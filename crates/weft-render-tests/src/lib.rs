//! Templates under `templates/` are compiled by the build script and
//! included here, so the tests exercise the generated code as a user crate
//! would see it.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod basics {
    #![allow(unused_variables)]
    include!(concat!(env!("OUT_DIR"), "/basics.rs"));
}

pub mod layout {
    #![allow(unused_variables)]
    include!(concat!(env!("OUT_DIR"), "/layout.rs"));
}

pub mod scripts {
    #![allow(unused_variables)]
    include!(concat!(env!("OUT_DIR"), "/scripts.rs"));
}

pub mod styles {
    #![allow(unused_variables)]
    include!(concat!(env!("OUT_DIR"), "/styles.rs"));
}

pub mod whitespace {
    #![allow(unused_variables)]
    include!(concat!(env!("OUT_DIR"), "/whitespace.rs"));
}

#[cfg(test)]
mod basics_tests;
#[cfg(test)]
mod layout_tests;
#[cfg(test)]
mod scripts_tests;
