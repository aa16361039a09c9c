fn a() {
  if x {
  }
  if y {
  }
  if z {
  }
  let beta = 3;
  if w {
  }
}
