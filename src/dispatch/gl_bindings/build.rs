/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::fs::File;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    // The registry files OpenGL 1.0's enums under 1.1, so 1.0 alone would
    // give us commands and types but no constants.
    //
    // The struct generator is used because it emits no global state. Its
    // function pointer struct is never instantiated: gldispatch resolves
    // addresses into its own per-context table.
    let mut file = File::create(out_dir.join("gl11compat.rs")).unwrap();
    Registry::new(Api::Gl, (1, 1), Profile::Compatibility, Fallbacks::None, [])
        .write_bindings(StructGenerator, &mut file)
        .unwrap();
}
