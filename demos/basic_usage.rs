use coded_errors::{define_error_codes, errcode, Result};

define_error_codes! {
    CONFIG_MISSING = (10_001, "config file {} missing"),
    CONFIG_INVALID = (10_002, "config line {} invalid: {}"),
}

fn load_configuration(path: &str) -> Result<()> {
    // Simulate a failure to parse a configuration file
    if path == "bad_config.toml" {
        return Err(errcode!(CONFIG_INVALID, 42, "unexpected EOF"));
    }
    if path.is_empty() {
        return Err(errcode!(CONFIG_MISSING, "<empty>"));
    }
    Ok(())
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    match load_configuration("bad_config.toml") {
        Ok(_) => println!("Success!"),
        Err(err) => {
            // One line with call site, code and message.
            println!("1. [DISPLAY]");
            println!("   {}", err);

            println!("\n2. [FIELDS]");
            println!("   Code:     {}", err.code());
            println!("   Message:  {}", err.message());
            if let Some(site) = err.call_site() {
                println!("   File:     {}", site.file());
                println!("   Function: {}", site.function().unwrap_or("<unknown>"));
                println!("   Line:     {}", site.line());
            }

            println!("\n3. [IDENTITY]");
            println!("   is CONFIG_INVALID: {}", err == CONFIG_INVALID);
            println!("   is CONFIG_MISSING: {}", err == CONFIG_MISSING);
        }
    }
}
