fn main() {
    bigforth::repl::run();
}
