//! Regenerates the complete suite of named fixtures into a directory of C++ headers
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use std::fs;
use std::path::PathBuf;

use clap::Parser;

use pid_fixtures::emit::to_cpp;
use pid_fixtures::fixture::{generate, FixtureConfigBuilder, SimulationMode};
use pid_fixtures::pid::Architecture;

#[derive(Parser)]
struct Args {
    /// Directory receiving one `<name>.hpp` per fixture
    out_dir: PathBuf,

    /// Simulate the Padé-delayed continuous loop instead of the exact discrete one
    #[arg(long)]
    continuous: bool,
}

struct Case {
    name: &'static str,
    arch: Architecture,
    gains: (f64, f64, f64),
    g: f64,
}

const fn case(name: &'static str, arch: Architecture, gains: (f64, f64, f64), g: f64) -> Case {
    Case {
        name,
        arch,
        gains,
        g,
    }
}

const SUITE: &[Case] = &[
    case("simple_p", Architecture::Pid, (0.5, 0.0, 0.0), 1.0),
    case("simple_i", Architecture::Pid, (0.0, 1.0, 0.0), 1.0),
    case("simple_d", Architecture::Pid, (0.0, 0.0, 0.002), 1.0),
    case("simple_pi", Architecture::Pid, (0.5, 1.0, 0.0), 1.0),
    case("simple_pd", Architecture::Pid, (0.5, 0.0, 0.002), 1.0),
    case("simple_pid", Architecture::Pid, (0.5, 1.0, 0.002), 1.0),
    case("simple_pi_d", Architecture::PiD, (0.5, 1.0, 0.002), 1.0),
    case("simple_i_pd", Architecture::IPd, (0.5, 1.0, 0.002), 1.0),
    case("general_pid", Architecture::Pid, (0.8, 2.5, 0.001), 2.5),
    case("general_pi_d", Architecture::PiD, (0.8, 2.5, 0.001), 2.5),
    case("general_i_pd", Architecture::IPd, (0.8, 2.5, 0.001), 2.5),
    // A unit proportional gain puts the discrete loop pole at z = -1
    case("occilate_p", Architecture::Pid, (1.0, 0.0, 0.0), 1.0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mode = if args.continuous {
        SimulationMode::Continuous
    } else {
        SimulationMode::DiscreteExact
    };
    fs::create_dir_all(&args.out_dir)?;

    for case in SUITE {
        let (kp, ki, kd) = case.gains;
        let config = FixtureConfigBuilder::new(case.name)
            .arch(case.arch)
            .kp(kp)
            .ki(ki)
            .kd(kd)
            .g(case.g)
            .mode(mode)
            .build()?;
        let response = generate(&config)?;

        let path = args.out_dir.join(format!("{}.hpp", case.name));
        fs::write(&path, to_cpp(&config, &response))?;
        println!("{}", path.display());
    }
    Ok(())
}
