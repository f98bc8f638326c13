use colored::*;

const WIDTH: usize = 79;

/// Startup banner. Kept short so scripted runs stay greppable.
pub fn banner() {
    let bar = "*".repeat(WIDTH - 2);
    println!("{}", format!("[{bar}]").cyan());
    centerln(&"--- IPMI RAKP Hash Dumper ---".bold().to_string());
    centerln("Tries candidate usernames against RMCP+ controllers and dumps");
    centerln("crackable hashes without authenticating. Hashcat mode 7300.");
    println!("{}", format!("[{bar}]").cyan());
}

fn centerln(text: &str) {
    println!("{text:^width$}", width = WIDTH);
}
