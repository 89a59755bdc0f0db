//! List built-in filters

use sieve_core::registry;

/// Run the filters command
pub fn run() {
    println!("Filters:");
    for name in registry::filters() {
        println!("  {}", name);
    }

    println!();
    println!("Aliases:");
    for (alias, name) in registry::aliases() {
        println!("  {:<14} -> {}", alias, name);
    }
}
