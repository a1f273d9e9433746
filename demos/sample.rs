// MIT License

// Copyright (c) 2023 Ryan Andersen

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use clap::Parser;

use randomness_recycling::entropy::rand::OsEntropySource;
use randomness_recycling::{AldrRecycleTable, AliasEoTable, CdfTable, FldrEoTable, LookupTable, Pool};

/// Draw samples from a categorical distribution using one of the library's samplers.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// Sampler to use: uniform, cdf, lookup, alias, fldr, aldr.
    sampler: String,

    /// Number of independent samples to draw.
    num_samples: usize,

    /// Distribution weights. For `uniform`, only the first value is used.
    #[arg(num_args = 1..)]
    weights: Vec<u32>,
}

fn main() {
    let args = Arguments::parse();
    let mut pool = Pool::new(OsEntropySource);

    let samples: Vec<u32> = match args.sampler.as_str() {
        "uniform" => (0..args.num_samples)
            .map(|_| pool.uniform_eo(u64::from(args.weights[0])) as u32)
            .collect(),
        "cdf" => {
            let table = CdfTable::preprocess(&args.weights);
            (0..args.num_samples).map(|_| table.sample(&mut pool)).collect()
        }
        "lookup" => {
            let table = LookupTable::preprocess(&args.weights);
            (0..args.num_samples).map(|_| table.sample(&mut pool)).collect()
        }
        "alias" => {
            let table = AliasEoTable::preprocess(&args.weights);
            (0..args.num_samples).map(|_| table.sample(&mut pool)).collect()
        }
        "fldr" => {
            let table = FldrEoTable::preprocess(&args.weights);
            (0..args.num_samples).map(|_| table.sample(&mut pool)).collect()
        }
        "aldr" => {
            let table = AldrRecycleTable::preprocess(&args.weights);
            (0..args.num_samples).map(|_| table.sample(&mut pool)).collect()
        }
        other => {
            eprintln!("unknown sampler: {other}");
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        samples
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
}
