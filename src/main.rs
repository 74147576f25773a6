// Exclude entire file from coverage - binary entry point cannot be unit tested
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

fn main() {
    if let Err(e) = teleprompter_lib::run() {
        teleprompter_lib::error!("{}", e);
        eprintln!("teleprompter: {}", e);
        std::process::exit(1);
    }
}
