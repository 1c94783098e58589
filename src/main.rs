// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Figspline: command-line driver for the spline editing core

fn main() -> anyhow::Result<()> {
    figspline::run()
}
