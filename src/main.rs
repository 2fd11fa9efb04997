fn main() {
    trip_planner::run();
}
