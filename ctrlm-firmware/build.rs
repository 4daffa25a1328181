// Build-Script: Wird vor dem Kompilieren ausgeführt
// Konfiguriert den Linker für ESP32-C6 Embedded Rust

fn main() {
    // Lade .env file für die CtrlM-Adresse
    // Ohne .env sucht der Tester das erste Gerät am Bus
    // Änderungen an der .env müssen das Build-Script neu auslösen,
    // sonst bleibt die alte Adresse eingebacken
    match dotenvy::dotenv() {
        Ok(path) => println!("cargo:rerun-if-changed={}", path.display()),
        Err(e) => {
            println!("cargo:rerun-if-changed=.env");
            eprintln!("⚠️  .env file nicht gefunden: {}", e);
            eprintln!("   CTRLM_ADDRESS nicht gesetzt, Tester nutzt Auto-Detect");
        }
    }

    // Gebe die CtrlM-Adresse an den Rust-Compiler weiter
    // Der Wert wird zur Compile-Zeit eingebacken (option_env! in config.rs)
    println!("cargo:rerun-if-env-changed=CTRLM_ADDRESS");
    if let Ok(address) = std::env::var("CTRLM_ADDRESS") {
        println!("cargo:rustc-env=CTRLM_ADDRESS={}", address);
    }

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_be_nice();

    // 1. defmt.x - defmt Logging-Support
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 Memory-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Error-Handler: Zeigt Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        let kind = &args[1];
        let what = &args[2];

        if kind == "undefined-symbol" {
            if what.starts_with("_defmt_") {
                eprintln!();
                eprintln!("💡 `defmt` not found - make sure `defmt.x` is added as a linker script");
                eprintln!();
            } else if what == "_stack_start" {
                eprintln!();
                eprintln!("💡 Is the linker script `linkall.x` missing?");
                eprintln!();
            } else if what.starts_with("esp_rtos_") {
                eprintln!();
                eprintln!("💡 `esp-rtos` not started - call `esp_rtos::start()` in main");
                eprintln!();
            }
            std::process::exit(0);
        }

        // Für "missing-lib" gibt es keine Tipps
        std::process::exit(1);
    }

    match std::env::current_exe() {
        Ok(exe) => println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        ),
        Err(e) => eprintln!("⚠️  Linker-Hilfe nicht verfügbar: {}", e),
    }
}
