fn main() {
    nanobasic::term::main()
}
