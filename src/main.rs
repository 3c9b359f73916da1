fn main() {
    marias::cli::run();
}
