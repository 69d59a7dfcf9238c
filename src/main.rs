fn main() {
    waypoint_tool::cli::run();
}
