fn main() -> anyhow::Result<()> {
    bython::run()
}
