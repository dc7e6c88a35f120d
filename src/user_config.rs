// litdoc Configuration
// Edit this file to change the compiled-in defaults, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Settings
    config.set("directive", "litdoc-lexer"); // `// litdoc-lexer: python` on line 1
    config.set("mode", "edit"); // edit | view | toc | raw
    config.set("verbose", false); // debug logging; RUST_LOG overrides

    // Extension associations, consulted after the built-in table
    // C / C++
    config.associate("hpp", "c_cpp");
    config.associate("hh", "c_cpp");
    config.associate("hxx", "c_cpp");
    config.associate("cxx", "c_cpp");
    config.associate("ino", "c_cpp");

    // Web
    config.associate("jsx", "javascript");
    config.associate("tsx", "javascript");
    config.associate("mts", "javascript");
    config.associate("xhtml", "html");
    config.associate("scss", "css");

    // Scripting
    config.associate("pyw", "python");
    config.associate("zsh", "shell");
    config.associate("ksh", "shell");

    // Hardware description
    config.associate("svh", "verilog");
    config.associate("vh", "verilog");
}
