use cidr_block::ipv4::range_summary;
use std::io::{self, BufRead};

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if let Ok(l) = line {
            if l.is_empty() {
                continue;
            }
            match range_summary(&l) {
                Ok(summary) => print!("{}", summary),
                Err(e) => eprintln!("{}", e),
            }
        }
    }
}
