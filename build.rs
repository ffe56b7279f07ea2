// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

// Make the dotconfig named by FWLOG_CONFIG visible to the crate, both as cfgs and as the generated
// `config` module.

fn main() {
    let config = fwlog_build::load();
    config.export_bool_config();
    config.build_config_mod();
}
