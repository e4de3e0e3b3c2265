use throttle_probe::error::AppResult;

fn main() -> AppResult<()> {
    throttle_probe::run()
}
