fn main() {
    roshambo::table::run(std::env::args());
}
